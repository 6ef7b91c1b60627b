pub mod channel_dialog;
pub mod channel_row;
pub mod channel_table;
pub mod channels_page;
pub mod form_field;
pub mod login;
pub mod options;
pub mod playlist_bar;
pub mod title_bar;
mod toast;

pub use channel_row::ChannelRow;
pub use channels_page::ChannelsPage;
pub use login::LoginPage;
pub use toast::ToastStack;
