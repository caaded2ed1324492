use crate::models::coin::{is_top_coin, COIN_OPTIONS};
use crate::utils::{CheckerError, Table};

pub fn execute() -> Result<(), CheckerError> {
    print!("{}", coin_table().render());
    Ok(())
}

/// Catalog table; shortlisted coins are starred
pub fn coin_table() -> Table {
    let mut table = Table::new(&["Id", "Name", "Symbol", "Top"]);
    for coin in COIN_OPTIONS {
        let top = if is_top_coin(coin.id) { "★" } else { "" };
        table.add_row(&[coin.id, coin.name, coin.symbol, top]);
    }
    table
}
