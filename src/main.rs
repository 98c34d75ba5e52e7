fn main() {
    if let Err(err) = link_deck::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
