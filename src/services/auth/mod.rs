pub mod authentication;
pub mod authority;
pub mod jwt;
pub mod password;
pub mod policy;

pub use authentication::{AuthenticationService, MemberLookup, PgMemberLookup};
pub use authority::{AuthorityUtils, Role};
pub use jwt::JwtTokenizer;
pub use password::PasswordEncoder;
pub use policy::SecurityPolicy;
