//! Text embedding seam.

use async_trait::async_trait;
use docchat_application::IndexError;

/// Turns texts into vectors. Output order matches input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, IndexError>;
}
