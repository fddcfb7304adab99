//! teamclock main entrypoint.

use teamclock::run;
use teamclock::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
