//! racetimer main entrypoint.

use racetimer::run;

fn main() {
    if let Err(e) = run() {
        racetimer::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
