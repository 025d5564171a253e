use std::process;

fn main() {
    process::exit(lectern_cli::run());
}
