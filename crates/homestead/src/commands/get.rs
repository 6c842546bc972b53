use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::CustomerStore;

pub fn run<S: CustomerStore>(store: &S, id: &str) -> Result<CmdResult> {
    let customer = store.fetch(id)?;
    Ok(CmdResult::with_customer(customer))
}
