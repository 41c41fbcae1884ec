mod allow_list_validator;
