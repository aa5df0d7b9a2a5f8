use urlshortener_storage::RedbRepository;

#[derive(Clone)]
pub struct AppState {
    repository: RedbRepository,
}

impl AppState {
    pub fn new(repository: RedbRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &RedbRepository {
        &self.repository
    }
}
