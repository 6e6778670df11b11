pub mod discard;
pub mod infoset;
pub mod position;
pub mod postflop;
pub mod preflop;
pub mod texture;

pub use discard::DiscardBucket;
pub use infoset::infoset_key;
pub use position::Position;
pub use postflop::PostflopBucket;
pub use preflop::PreflopBucket;
pub use texture::Texture;
