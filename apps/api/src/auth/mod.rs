// Session/identity: stateless JWT sessions, password hashing, and the
// role gate applied by the route extractors.

pub mod extract;
pub mod gate;
pub mod handlers;
pub mod password;
pub mod tokens;
