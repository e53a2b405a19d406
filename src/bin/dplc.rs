fn main() {
    if let Err(err) = dplc::cli::dplc::main(std::env::args_os()) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
