//! Alternate binary name (`lnk`) that forwards to the `link_deck` library.
//! Keeping the alias as a real binary avoids shell alias requirements.

fn main() {
    if let Err(err) = link_deck::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
