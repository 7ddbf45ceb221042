mod extract;
mod token;

pub use extract::CurrentAccount;
pub use token::TokenIssuer;
