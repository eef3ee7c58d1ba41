pub mod game_documents;

pub use game_documents::Entity as GameDocuments;
pub use game_documents::Model as GameDocument;
