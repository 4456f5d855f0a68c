pub mod sync_service;

pub use sync_service::{
    request_check_status, request_import_many, request_import_one, request_sync_all,
    request_sync_one, schedule, SyncSender, SyncServiceMessage,
};
