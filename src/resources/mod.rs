/*!
 * Resources Module
 * Fixed resource set and the allocator that serves it
 */

mod allocator;
pub mod resource;

pub use resource::{Resource, ResourceIndex, ResourceInfo, Waiter};
