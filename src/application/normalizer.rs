use super::classifier::{classify, join_messages};
use crate::domain::authorization::AuthRef;
use crate::domain::response::ParsedResponse;
use crate::domain::result::TransactionResult;

/// Turns one gateway response into a [`TransactionResult`].
///
/// The authorization keeps the purchase number of `reference`. Its transaction id comes
/// from the response's `ID_UNICO` when present, otherwise from `reference`.
pub fn normalize(response: ParsedResponse, reference: &AuthRef, test: bool) -> TransactionResult {
    let classification = classify(&response.fields);
    let transaction_id = response
        .fields
        .transaction_id_text()
        .or_else(|| reference.transaction_id());
    let authorization = AuthRef::from_parts(reference.purchase_number(), transaction_id);

    TransactionResult {
        success: classification.success,
        message: classification.message,
        error_code: classification.code,
        authorization,
        params: response.raw,
        test,
    }
}

/// Folds two failed calls of one operation into a single failure.
///
/// The later call's message comes first. The error code is the earlier call's.
pub fn merge_failures(later: TransactionResult, earlier: &TransactionResult) -> TransactionResult {
    TransactionResult {
        message: join_messages([Some(later.message.as_str()), Some(earlier.message.as_str())]),
        error_code: earlier.error_code,
        ..later
    }
}
