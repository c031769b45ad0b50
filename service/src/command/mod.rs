//! [`Command`] definition.

pub mod create_property;
pub mod delete_inquiry;
pub mod delete_property;
pub mod submit_inquiry;
pub mod update_property;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_property::CreateProperty, delete_inquiry::DeleteInquiry,
    delete_property::DeleteProperty, submit_inquiry::SubmitInquiry,
    update_property::UpdateProperty,
};
