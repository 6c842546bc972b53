use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CustomerPatch, StoredCustomer};
use crate::store::CustomerStore;
use crate::validation::validate_patch;

pub fn run<S: CustomerStore>(store: &S, id: &str, patch: &CustomerPatch) -> Result<CmdResult> {
    let patch = validate_patch(patch)?;

    let mut result = match store.apply_update(id, &patch)? {
        StoredCustomer::Complete(customer) => CmdResult::with_customer(customer),
        StoredCustomer::Partial(record) => CmdResult::with_partial(record),
    };
    result.add_message(CmdMessage::success("Customer data updated successfully"));
    if result.partial.is_some() {
        result.add_message(CmdMessage::warning(
            "Stored record is still missing required fields",
        ));
    }
    if patch.is_empty() {
        result.add_message(CmdMessage::info("No fields were changed"));
    }
    Ok(result)
}
