use crate::scoring::ServingContext;

#[derive(Clone)]
pub struct HandlerState {
    pub context: ServingContext,
}

impl HandlerState {
    pub fn new(context: ServingContext) -> Self {
        Self { context }
    }
}
