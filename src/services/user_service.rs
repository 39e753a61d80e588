use super::resource::{CreatePolicy, Resource};
use crate::models::{PageShape, User, UserDraft};

/// `/users`; accounts are created through `/users/register`
pub struct Users;

impl Resource for Users {
    type Id = String;
    type Record = User;
    type Draft = UserDraft;
    type Scope = ();

    const SINGULAR: &'static str = "User";
    const PLURAL: &'static str = "users";
    const PAGE_SHAPE: PageShape = PageShape::Flat;
    const CREATE_POLICY: CreatePolicy = CreatePolicy::Refetch;

    fn collection_path(_: &()) -> String {
        "/users".to_string()
    }

    fn create_path(_: &()) -> String {
        "/users/register".to_string()
    }

    fn item_path(_: &(), id: &String) -> String {
        format!("/users/{}", id)
    }

    fn record_id(record: &User) -> String {
        record.id.clone()
    }
}
