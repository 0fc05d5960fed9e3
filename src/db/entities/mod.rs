pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{Entity as Artist, NewArtist};
pub use show::{Entity as Show, NewShow, ShowTimeline};
pub use venue::{Entity as Venue, NewVenue};
