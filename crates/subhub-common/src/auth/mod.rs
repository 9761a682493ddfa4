//! Signed tokens: user sessions and share links

mod jwt;
mod share_link;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use share_link::{ShareClaims, ShareLink, ShareLinkService};
