pub mod clock;
pub mod db;
pub mod mailer;
pub mod sweeper;
