mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod spec;
mod system;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
