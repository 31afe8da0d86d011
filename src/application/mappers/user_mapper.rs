//! Mapping between [`User`] and its transfer objects.

use uuid::Uuid;

use super::EntityMapper;
use crate::application::dto::{CreateUserDto, UpdateUserDto, UserDto};
use crate::domain::entities::User;

pub struct UserMapper;

impl EntityMapper for UserMapper {
    type Entity = User;
    type Dto = UserDto;
    type CreateDto = CreateUserDto;
    type UpdateDto = UpdateUserDto;

    fn to_dto(user: &User) -> UserDto {
        UserDto {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }

    fn from_create(id: Uuid, dto: CreateUserDto) -> User {
        User::new(id, dto.full_name, dto.email, dto.phone)
    }

    fn from_update(dto: UpdateUserDto) -> User {
        User::new(dto.id, dto.full_name, dto.email, dto.phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mapping_uses_given_id() {
        let id = Uuid::new_v4();
        let user = UserMapper::from_create(
            id,
            CreateUserDto {
                full_name: "Grace Hopper".to_string(),
                email: "grace@navy.mil".to_string(),
                phone: None,
            },
        );

        assert_eq!(user.id, id);
        assert_eq!(user.full_name, "Grace Hopper");
    }

    #[test]
    fn test_to_dto_copies_every_field() {
        let user = User::new(
            Uuid::new_v4(),
            "Grace Hopper".to_string(),
            "grace@navy.mil".to_string(),
            Some("+1 555 0100".to_string()),
        );

        let dto = UserMapper::to_dto(&user);

        assert_eq!(dto.id, user.id);
        assert_eq!(dto.full_name, user.full_name);
        assert_eq!(dto.email, user.email);
        assert_eq!(dto.phone, user.phone);
    }

    #[test]
    fn test_update_mapping_keeps_id() {
        let id = Uuid::new_v4();
        let user = UserMapper::from_update(UpdateUserDto {
            id,
            full_name: "Grace B. Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: None,
        });

        assert_eq!(user.id, id);
        assert_eq!(user.full_name, "Grace B. Hopper");
    }
}
