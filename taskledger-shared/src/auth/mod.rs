/// Identity and access control
///
/// # Modules
///
/// - [`identity`]: parses the caller-supplied user ID and resolves its role
/// - [`authorization`]: the role gate and the assignee check
///
/// # Security
///
/// ⚠️  Identity is asserted, not proven: any caller can send any user ID.
/// Passwords are only used by the login lookup, and compared in plaintext.
/// Both are known weaknesses of the current data model.
///
/// # Example
///
/// ```no_run
/// use taskledger_shared::auth::{authorization::authorize, identity::{Caller, UnknownIdentityPolicy}};
/// use taskledger_shared::models::user::Role;
/// use taskledger_shared::store::memory::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let caller = Caller::from_header(Some("1"));
/// let identity = authorize(&store, Role::Manager, &caller, UnknownIdentityPolicy::Reject).await?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod identity;
