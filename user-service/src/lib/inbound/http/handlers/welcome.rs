const WELCOME: &str = "\
User management service with registration, login and CRUD on users.

Routes available:
- GET    /                 : Welcome message
- POST   /users/register   : Register a new user
- POST   /users/login      : Log in (sets the auth_token cookie)
- GET    /users/logout     : Log out (expires the auth_token cookie)
- GET    /users            : List all users (authenticated)
- POST   /users            : Create a user (authenticated)
- GET    /users/{id}       : Get user by ID (authenticated)
- PUT    /users/{id}       : Update user by ID (authenticated)
- DELETE /users/{id}       : Delete user by ID (authenticated)
";

pub async fn welcome() -> &'static str {
    WELCOME
}
