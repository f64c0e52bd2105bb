use cereal_api::cli;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("{}: {err}", err.code());
        std::process::exit(1);
    }
}
