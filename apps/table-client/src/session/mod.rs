pub mod table_session;


pub use table_session::TableSession;
