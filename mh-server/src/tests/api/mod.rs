mod error;
mod list_meetings_query;
