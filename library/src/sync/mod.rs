pub mod device_sync_cache;
