pub mod bubble;
pub mod bubble_list;
pub mod input_box;
pub mod loading;
pub mod notice;
pub mod scroll;
pub mod syntaxes;
pub mod textarea;
pub mod upload;
pub mod utils;

pub use bubble::Bubble;
pub use bubble_list::BubbleList;
pub use input_box::InputBox;
pub use loading::Loading;
pub use notice::Notice;
pub use scroll::Scroll;
pub use textarea::TextArea;
pub use upload::UploadPanel;
