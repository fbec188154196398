fn main() {
    if let Err(err) = sleepfast_lib::run() {
        log::error!("sleepfast failed: {err:#}");
        std::process::exit(1);
    }
}
