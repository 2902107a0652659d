//! Numeric reply codes and fixed strings, mirrored after the teacher's
//! `constants.rs` NB/STR constant-pair convention.

pub const SERVER_NAME: &str = "ft_irc.42.fr";
pub const SERVER_VERSION: &str = "1.0";
/// Channel modes this server actually implements (summarized for RPL_MYINFO / RPL_CHANNELMODEIS).
pub const USER_MODES: &str = "";
pub const CHANNEL_MODES: &str = "itkl o";

pub const MAX_LINE_BYTES: usize = 512;
pub const MAX_NICK_LEN: usize = 30;
pub const MAX_CHANNEL_NAME_LEN: usize = 50;
pub const MAX_PASSWORD_LEN: usize = 50;

// 001 RPL_WELCOME
pub const RPL_WELCOME_NB: u16 = 1;
// 002 RPL_YOURHOST
pub const RPL_YOURHOST_NB: u16 = 2;
// 003 RPL_CREATED
pub const RPL_CREATED_NB: u16 = 3;
// 004 RPL_MYINFO
pub const RPL_MYINFO_NB: u16 = 4;

// 324 RPL_CHANNELMODEIS
pub const RPL_CHANNELMODEIS_NB: u16 = 324;
// 332 RPL_TOPIC
pub const RPL_TOPIC_NB: u16 = 332;
// 353 RPL_NAMREPLY
pub const RPL_NAMREPLY_NB: u16 = 353;
// 366 RPL_ENDOFNAMES
pub const RPL_ENDOFNAMES_NB: u16 = 366;

// 401 ERR_NOSUCHNICK
pub const ERR_NOSUCHNICK_NB: u16 = 401;
pub const ERR_NOSUCHNICK_STR: &str = "No such nick/channel";
// 403 ERR_NOSUCHCHANNEL
pub const ERR_NOSUCHCHANNEL_NB: u16 = 403;
pub const ERR_NOSUCHCHANNEL_STR: &str = "No such channel";
// 404 ERR_CANNOTSENDTOCHAN
pub const ERR_CANNOTSENDTOCHAN_NB: u16 = 404;
pub const ERR_CANNOTSENDTOCHAN_STR: &str = "Cannot send to channel";
// 411 ERR_NORECIPIENT
pub const ERR_NORECIPIENT_NB: u16 = 411;
pub const ERR_NORECIPIENT_STR: &str = "No recipient given";
// 412 ERR_NOTEXTTOSEND
pub const ERR_NOTEXTTOSEND_NB: u16 = 412;
pub const ERR_NOTEXTTOSEND_STR: &str = "No text to send";
// 421 ERR_UNKNOWNCOMMAND
pub const ERR_UNKNOWNCOMMAND_NB: u16 = 421;
pub const ERR_UNKNOWNCOMMAND_STR: &str = "Unknown command";
// 431 ERR_NONICKNAMEGIVEN
pub const ERR_NONICKNAMEGIVEN_NB: u16 = 431;
pub const ERR_NONICKNAMEGIVEN_STR: &str = "No nickname given";
// 432 ERR_ERRONEUSNICKNAME
pub const ERR_ERRONEUSNICKNAME_NB: u16 = 432;
pub const ERR_ERRONEUSNICKNAME_STR: &str = "Erroneous nickname";
// 433 ERR_NICKNAMEINUSE
pub const ERR_NICKNAMEINUSE_NB: u16 = 433;
pub const ERR_NICKNAMEINUSE_STR: &str = "Nickname is already in use";
// 441 ERR_USERNOTINCHANNEL
pub const ERR_USERNOTINCHANNEL_NB: u16 = 441;
pub const ERR_USERNOTINCHANNEL_STR: &str = "They aren't on that channel";
// 442 ERR_NOTONCHANNEL
pub const ERR_NOTONCHANNEL_NB: u16 = 442;
pub const ERR_NOTONCHANNEL_STR: &str = "You're not on that channel";
// 443 ERR_USERONCHANNEL
pub const ERR_USERONCHANNEL_NB: u16 = 443;
pub const ERR_USERONCHANNEL_STR: &str = "is already on channel";
// 461 ERR_NEEDMOREPARAMS
pub const ERR_NEEDMOREPARAMS_NB: u16 = 461;
pub const ERR_NEEDMOREPARAMS_STR: &str = "Not enough parameters";
// 462 ERR_ALREADYREGISTERED
pub const ERR_ALREADYREGISTERED_NB: u16 = 462;
pub const ERR_ALREADYREGISTERED_STR: &str = "You may not reregister";
// 464 ERR_PASSWDMISMATCH
pub const ERR_PASSWDMISMATCH_NB: u16 = 464;
pub const ERR_PASSWDMISMATCH_STR: &str = "Password incorrect";
// 471 ERR_CHANNELISFULL
pub const ERR_CHANNELISFULL_NB: u16 = 471;
pub const ERR_CHANNELISFULL_STR: &str = "Cannot join channel (+l)";
// 473 ERR_INVITEONLYCHAN
pub const ERR_INVITEONLYCHAN_NB: u16 = 473;
pub const ERR_INVITEONLYCHAN_STR: &str = "Cannot join channel (+i)";
// 475 ERR_BADCHANNELKEY
pub const ERR_BADCHANNELKEY_NB: u16 = 475;
pub const ERR_BADCHANNELKEY_STR: &str = "Cannot join channel (+k)";
// 482 ERR_CHANOPRIVSNEEDED
pub const ERR_CHANOPRIVSNEEDED_NB: u16 = 482;
pub const ERR_CHANOPRIVSNEEDED_STR: &str = "You're not channel operator";
