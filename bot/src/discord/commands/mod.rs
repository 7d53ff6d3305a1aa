mod backup;
mod help;
mod setup;
mod stats;

pub use backup::{backup, debugbackup};
pub use help::help;
pub use setup::setup;
pub use stats::{resetstats, warstats};

use super::{Data, Error};

/// Every slash command the bot registers.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help(),
        setup(),
        backup(),
        debugbackup(),
        warstats(),
        resetstats(),
    ]
}

/// Commands tagged `[ADMIN]` in `/help`.
pub(crate) const ADMIN_COMMANDS: [&str; 3] = ["setup", "debugbackup", "resetstats"];
