//! Directory pages: groups, events, and users.
//!
//! Listings partition on membership-record *presence*: a record at any
//! level, pending requests included, files the entry under "mine".

use gather_core::{Event, Group, User};

use crate::error::ClientError;
use crate::session::SessionContext;

pub fn partition_groups(groups: Vec<Group>) -> (Vec<Group>, Vec<Group>) {
    groups.into_iter().partition(Group::has_membership)
}

pub fn partition_events(events: Vec<Event>) -> (Vec<Event>, Vec<Event>) {
    events.into_iter().partition(Event::has_attendance)
}

/// The groups directory, split into the viewer's groups and the rest.
#[derive(Debug)]
pub struct GroupsDirectory {
    pub mine: Vec<Group>,
    pub discover: Vec<Group>,
}

impl GroupsDirectory {
    pub async fn load(ctx: &SessionContext) -> Result<Self, ClientError> {
        ctx.check_token_status().await;
        let token = ctx.access_token();
        let groups = ctx.api().list_groups(token.as_deref()).await?.groups;
        let (mine, discover) = partition_groups(groups);
        Ok(Self { mine, discover })
    }
}

/// The events directory, split the same way.
#[derive(Debug)]
pub struct EventsDirectory {
    pub mine: Vec<Event>,
    pub discover: Vec<Event>,
}

impl EventsDirectory {
    pub async fn load(ctx: &SessionContext) -> Result<Self, ClientError> {
        ctx.check_token_status().await;
        let token = ctx.access_token();
        let events = ctx.api().list_events(token.as_deref()).await?.events;
        let (mine, discover) = partition_events(events);
        Ok(Self { mine, discover })
    }
}

/// The users directory, optionally server-side filtered.
#[derive(Debug)]
pub struct UsersDirectory {
    pub users: Vec<User>,
}

impl UsersDirectory {
    pub async fn load(ctx: &SessionContext, search: Option<&str>) -> Result<Self, ClientError> {
        ctx.check_token_status().await;
        let token = ctx.access_token();
        let users = ctx.api().list_users(search, token.as_deref()).await?.users;
        Ok(Self { users })
    }
}
