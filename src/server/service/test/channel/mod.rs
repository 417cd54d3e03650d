use crate::server::{error::AppError, service::channel::ChannelService};
use test_utils::{builder::TestBuilder, factory};
