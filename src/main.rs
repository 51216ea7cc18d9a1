fn main() {
    if handle_cli_flags() {
        return;
    }

    if let Err(err) = clx::run() {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn handle_cli_flags() -> bool {
    let mut saw_flag = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("clx {}", clx::VERSION);
                saw_flag = true;
            }
            "--help" | "-h" => {
                println!(
                    "clx - Browse Hacker News from the terminal.\n\n  --version, -V        Show version and exit\n  --help,    -h        Show this help message\n\nConfig: {}\nLogs are filtered with {} (default: info).",
                    clx::config::default_path()
                        .map(|path| path.display().to_string())
                        .unwrap_or_else(|| "~/.config/clx/config.yaml".to_string()),
                    clx::logging::LOG_ENV
                );
                saw_flag = true;
            }
            _ => {}
        }
    }
    saw_flag
}
