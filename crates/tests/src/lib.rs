#[cfg(test)]
mod common;

#[cfg(test)]
mod login_tests;



#[cfg(test)]
mod report_tests;

#[cfg(test)]
mod status_tests;


#[cfg(test)]
mod list_tests;


#[cfg(test)]
mod api_tests;
