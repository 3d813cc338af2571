mod contacts;
pub use contacts::Contacts;

mod modal_overlay;
pub use modal_overlay::ModalOverlay;
