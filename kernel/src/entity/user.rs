mod id;
mod name;
mod password;
mod profile;
mod role;

pub use self::{id::*, name::*, password::*, profile::*, role::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, Mutation, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    first_name: FirstName,
    last_name: LastName,
    telephone: Option<Telephone>,
    address: Option<Address>,
    role: Role,
    password: PasswordHash,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        first_name: FirstName,
        last_name: LastName,
        telephone: Option<Telephone>,
        address: Option<Address>,
        role: Role,
        password: PasswordHash,
    ) -> Self {
        Self {
            id,
            name,
            email,
            first_name,
            last_name,
            telephone,
            address,
            role,
            password,
        }
    }
}
