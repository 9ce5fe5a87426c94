use crate::embedding::Embedder;
use crate::suggest::SynonymService;

pub struct HandlerState<E> {
    pub service: SynonymService<E>,
}

impl<E> Clone for HandlerState<E> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<E: Embedder + 'static> HandlerState<E> {
    pub fn new(service: SynonymService<E>) -> Self {
        Self { service }
    }

    pub fn embedder_is_stub(&self) -> bool {
        self.service.ranker().embedder().is_stub()
    }
}
