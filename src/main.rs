fn main() {
    if let Err(error) = voxscribe::run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
