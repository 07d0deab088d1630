use application::transfer::{GetUserDto, SelectDto};
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::PageRequest;

#[derive(Debug)]
pub struct GetUserRequest {
    id: Uuid,
}

impl GetUserRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct UserTransformer;

impl Intake<GetUserRequest> for UserTransformer {
    type To = GetUserDto;
    fn emit(&self, input: GetUserRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<PageRequest> for UserTransformer {
    type To = SelectDto;
    fn emit(&self, input: PageRequest) -> Self::To {
        SelectDto::from(input)
    }
}
