//! A user and its storage.

/// A registered user.
///
/// @templater(table => users, {
///     pub struct {{name}}Repo;
///
///     impl {{name}}Repo {
///         pub const TABLE: &'static str = "{{table}}";
///     }
/// })
/// @serde(rename_all => camelCase)
pub struct UserAccount {
    pub id: u64,
    pub name: String,
}

/**
 * Persistence for users.
 *
 * @templater(file => store.ts, dir => web, override => false, {
 *     export interface {{name}} {}
 * })
 */
pub trait UserStore {
    fn load(&self, id: u64) -> Option<UserAccount>;
}

/// @templater({
///     never rendered
/// })
pub fn helper() {}
