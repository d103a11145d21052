mod linked;
