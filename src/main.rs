mod audio;
mod config;
mod library;
mod mpris;
mod page;
mod player;
mod runtime;
mod ui;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("floatplay: {e}");
        std::process::exit(1);
    }
}
