//! Pool CLI command.

use anyhow::Result;
use clap::Args;

use crate::services::SubgoalGenerator;

#[derive(Args, Debug)]
pub struct PoolArgs {}

/// Print the builtin subgoal pool.
pub fn execute(_args: PoolArgs, json: bool) -> Result<()> {
    let generator = SubgoalGenerator::new();
    let entries = generator.pool().entries();

    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    println!("Builtin subgoal pool ({} entries):\n", entries.len());
    for (index, text) in entries.iter().enumerate() {
        println!("{index:>3}  {text}");
    }
    Ok(())
}
