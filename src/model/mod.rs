mod instructor;
mod message;
mod plant;

pub use instructor::Instructor;
pub use message::{ConversationLog, Message, Role, WELCOME_MESSAGE_ID};
pub use plant::{PlantCareGuide, PlantInfo};
