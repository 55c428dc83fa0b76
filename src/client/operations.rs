//! Named methods for the built-in operations.
//!
//! Each method is a thin wrapper over [`PaystackClient::call`] with the
//! operation name fixed, e.g. `client.get_transaction(args)` is
//! `client.call("getTransaction", args)`.

use crate::binding::CallArgs;
use crate::client::core::PaystackClient;
use crate::transport::ApiResponse;
use crate::Result;

macro_rules! paystack_operations {
    ($($method:ident => $operation:literal,)*) => {
        /// Names of every built-in operation with a generated method.
        pub const BUILTIN_OPERATIONS: &[&str] = &[$($operation),*];

        impl PaystackClient {
            $(
                #[doc = concat!("Call `", $operation, "`.")]
                pub async fn $method(&self, args: CallArgs) -> Result<ApiResponse> {
                    self.call($operation, args).await
                }
            )*
        }
    };
}

paystack_operations! {
    charge_card => "chargeCard",
    submit_pin => "submitPin",
    submit_otp => "submitOtp",
    submit_phone => "submitPhone",
    submit_birthday => "submitBirthday",
    check_pending => "checkPending",
    get_payment_session_timeout => "getPaymentSessionTimeout",
    update_payment_session_timeout => "updatePaymentSessionTimeout",
    create_customer => "createCustomer",
    get_customer => "getCustomer",
    list_customer => "listCustomer",
    update_customer => "updateCustomer",
    set_risk_action_on_customer => "setRiskActionOnCustomer",
    deactivate_auth_on_customer => "deactivateAuthOnCustomer",
    create_invoice => "createInvoice",
    view_invoice => "viewInvoice",
    list_invoice => "listInvoice",
    update_invoice => "updateInvoice",
    verify_invoice => "verifyInvoice",
    send_invoice_notification => "sendInvoiceNotification",
    invoice_totals => "invoiceTotals",
    finalize_invoice_draft => "finalizeInvoiceDraft",
    archive_invoice => "archiveInvoice",
    list_banks => "listBanks",
    create_page => "createPage",
    get_page => "getPage",
    list_page => "listPage",
    update_page => "updatePage",
    check_slug_availability => "checkSlugAvailability",
    create_plan => "createPlan",
    get_plan => "getPlan",
    list_plan => "listPlan",
    update_plan => "updatePlan",
    create_product => "createProduct",
    get_product => "getProduct",
    list_product => "listProduct",
    update_product => "updateProduct",
    create_refund => "createRefund",
    get_refund => "getRefund",
    list_refund => "listRefund",
    fetch_settlements => "fetchSettlements",
    create_subaccount => "createSubaccount",
    get_subaccount => "getSubaccount",
    list_subaccount => "listSubaccount",
    update_subaccount => "updateSubaccount",
    create_subscription => "createSubscription",
    disable_subscription => "disableSubscription",
    enable_subscription => "enableSubscription",
    fetch_subscription => "fetchSubscription",
    list_subscription => "listSubscription",
    initialize_transaction => "initializeTransaction",
    verify_transaction => "verifyTransaction",
    list_transaction => "listTransaction",
    get_transaction => "getTransaction",
    charge_authorization => "chargeAuthorization",
    view_transaction_timeline => "viewTransactionTimeline",
    transaction_totals => "transactionTotals",
    export_transaction => "exportTransaction",
    request_reauthorization => "requestReauthorization",
    check_authorization => "checkAuthorization",
    create_transfer_recipient => "createTransferRecipient",
    list_transfer_recipients => "listTransferRecipients",
    update_transfer_recipient => "updateTransferRecipient",
    delete_transfer_recipient => "deleteTransferRecipient",
    initiate_transfer => "initiateTransfer",
    list_transfers => "listTransfers",
    fetch_transfer => "fetchTransfer",
    finalize_transfer => "finalizeTransfer",
    initiate_bulk_transfer => "initiateBulkTransfer",
    verify_transfer => "verifyTransfer",
    check_balance => "checkBalance",
    resend_transfer_otp => "resendTransferOtp",
    disable_transfer_otp => "disableTransferOtp",
    finalize_disable_transfer_otp => "finalizeDisableTransferOtp",
    enable_transfer_otp => "enableTransferOtp",
    resolve_bvn => "resolveBVN",
    resolve_account_number => "resolveAccountNumber",
    resolve_card_bin => "resolveCardBin",
    resolve_phone_number => "resolvePhoneNumber",
}
