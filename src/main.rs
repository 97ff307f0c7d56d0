use caphe::cli::{self, commands, Args};
use clap::Parser;

fn main() {
    let args = Args::parse();

    let workspace = match commands::resolve_workspace(args.workspace.as_deref()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("error: {:#}", err);
            std::process::exit(2);
        }
    };
    let logging_guard = match caphe::logging::init(Some(&workspace)) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {:#}", err);
            None
        }
    };

    let code = match cli::run(args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("error: {:#}", err);
            if let Some(path) = logging_guard.as_ref().and_then(|g| g.log_file_path()) {
                eprintln!("details: {}", path.display());
            }
            2
        }
    };

    if code != 0 {
        drop(logging_guard);
        std::process::exit(code);
    }
}
