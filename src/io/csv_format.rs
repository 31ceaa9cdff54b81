//! CSV output of wallet state
//!
//! Pure formatting over any writer, used by the `export-wallets` command.

use crate::types::Wallet;
use std::io::Write;

/// Write wallets to CSV format
///
/// Writes wallets with columns: address, balance.
/// Wallets are sorted by address for deterministic output.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_wallets_csv(wallets: &[Wallet], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["address", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted: Vec<&Wallet> = wallets.iter().collect();
    sorted.sort_by(|a, b| a.address.cmp(&b.address));

    for wallet in sorted {
        let balance = wallet.balance.normalize().to_string();
        writer
            .write_record([wallet.address.as_str(), balance.as_str()])
            .map_err(|e| format!("Failed to write wallet record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
