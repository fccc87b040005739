pub mod listing_server;
pub mod stub_uploader;
