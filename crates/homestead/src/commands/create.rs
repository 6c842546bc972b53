use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Customer;
use crate::store::CustomerStore;
use crate::validation::validate_customer;

pub fn run<S: CustomerStore>(store: &S, customer: Customer) -> Result<CmdResult> {
    let customer = validate_customer(customer)?;

    let stored = store.insert(&customer)?;
    let mut result = CmdResult::with_customer(stored);
    result.add_message(CmdMessage::success(format!(
        "Customer created: {}",
        customer.id
    )));
    Ok(result)
}
