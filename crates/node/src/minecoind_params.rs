fn main() {
    if let Err(err) = minecoind::run_entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
