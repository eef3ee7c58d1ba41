pub mod game_documents_sea;
