pub mod texture_sync;
