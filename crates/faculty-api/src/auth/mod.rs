pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use jwt::JwtService;
pub use models::{AdminContext, AuthContext, JwtClaims, TokenKind};
