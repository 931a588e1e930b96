pub mod pr_reviewer;
pub mod pull_request;
pub mod team;
pub mod user;

/*
 Teams are keyed by name, users carry their team by name (many-to-one).
 A pull request has one author and a set of reviewers stored as edges in
 pr_reviewers, so removing an edge never touches the user row.
 */
