use crate::commands::{CmdMessage, CmdResult, ZettelPaths};
use crate::config::{ZettelConfig, CONFIG_FILENAME};
use crate::error::Result;
use std::fs;

pub fn run(paths: &ZettelPaths) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    fs::create_dir_all(dir)?;

    let mut result = CmdResult::default();
    if !dir.join(CONFIG_FILENAME).exists() {
        ZettelConfig::default().save(dir)?;
    }
    result.add_message(CmdMessage::success(format!(
        "Initialized zettel store at {}",
        dir.display()
    )));
    Ok(result)
}
