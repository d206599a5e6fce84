use async_trait::async_trait;

use reelshelf_model::{Page, QuerySignature};

use crate::error::NetworkError;

/// Issues one listing request per page.
///
/// The page size is fixed by the backend contract; implementations never
/// retry, a failure is handed straight back to the caller.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, signature: &QuerySignature, page: u32) -> Result<Page, NetworkError>;
}
